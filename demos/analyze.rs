use miette::Result;
use weathertab::{calendar_month, Table};

fn main() -> Result<()> {
    let file = std::env::args()
        .nth(1)
        .unwrap_or_else(|| String::from("assets/weather.csv"));
    println!("opening {file}");

    let table = Table::load(&file)?;
    let averages = table.monthly_averages()?;

    for (i, &month) in averages.months.iter().enumerate() {
        let label = calendar_month(month).map_or_else(|| month.to_string(), |m| m.to_string());
        match &averages.humidity {
            Some(humidity) => println!(
                "{label}: {:.1}°C, {:.1} mm of rain, {:.0}% humidity",
                averages.temperature[i], averages.rainfall[i], humidity[i]
            ),
            None => println!(
                "{label}: {:.1}°C, {:.1} mm of rain",
                averages.temperature[i], averages.rainfall[i]
            ),
        }
    }

    let hottest = table.hottest_month()?;
    let rainiest = table.rainiest_month()?;
    println!(
        "hottest reading: {:.1}°C in month {}",
        hottest.value, hottest.month
    );
    println!(
        "rainiest reading: {:.1} mm in month {}",
        rainiest.value, rainiest.month
    );

    Ok(())
}
