use miette::{miette, Result};
use weathertab::Table;

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let file = args.next().unwrap_or_else(|| String::from("assets/daily.csv"));
    let month: u32 = args
        .next()
        .as_deref()
        .unwrap_or("6")
        .parse()
        .map_err(|_| miette!("the month must be a number"))?;

    let table = Table::load(&file)?;
    let selected = if table.width() > Table::DAY_COLUMN {
        table.filter_by_day(month, Table::DAY_COLUMN)?
    } else {
        table.filter_by_month(month)
    };
    println!(
        "{} of {} observations in month {month}",
        selected.len(),
        table.len()
    );
    for row in selected.rows() {
        println!("{row:?}");
    }

    let output = format!("month_{month}.csv");
    selected.export_csv(&output)?;
    println!("wrote {output}");

    Ok(())
}
