//! Example rendering the two teaching charts side by side in a temp directory.
//!
//! Prints how the residual spread evolves along X1 for each regime, then
//! writes `homoscedastic.png` and `heteroscedastic.png`.

use regsurface::prelude::*;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    println!("Homoscedastic vs Heteroscedastic Regression Surfaces");
    println!("====================================================");

    let generator = RegressionSurfaceGenerator::new(GeneratorConfig {
        seed: Some(2024),
        ..GeneratorConfig::default()
    })?;
    let pair = generator.generate_pair(None)?;

    for output in pair.iter() {
        let spread = output.residual_spread_by_x1();
        println!(
            "{:>16}: max |residual| at X1=0 is {:6.2}, at X1={} is {:6.2}",
            output.regime().to_string(),
            spread[0],
            output.surface().x1_axis().range(),
            spread[spread.len() - 1]
        );
    }

    let out_dir = std::env::temp_dir().join("regsurface_demo");
    std::fs::create_dir_all(&out_dir)?;
    let written = render_pair(&pair, &out_dir, ImageFormat::Png, &PlotConfig::default())?;

    println!("\nCharts written:");
    for path in written {
        println!("  {}", path.display());
    }

    Ok(())
}
