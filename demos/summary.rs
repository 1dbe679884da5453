use log::info;
use miette::{miette, IntoDiagnostic, Result, WrapErr};
use weather_summary::{generate_daily_summary, generate_summary, WeatherDataset};

fn main() -> Result<()> {
    env_logger::init();

    let file = std::env::args()
        .nth(1)
        .ok_or_else(|| miette!("Missing filename"))?;
    info!("opening {file}");
    let input = std::fs::read_to_string(&file)
        .into_diagnostic()
        .wrap_err_with(|| format!("Could not read `{file}`"))?;

    let dataset: WeatherDataset = input.parse()?;

    print!("{}", generate_summary(&dataset)?);
    println!();
    print!("{}", generate_daily_summary(&dataset)?);

    Ok(())
}
