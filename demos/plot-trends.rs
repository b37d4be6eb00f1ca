use plotters::prelude::*;
use weathertab::Table;

fn main() {
    let input = std::env::args()
        .nth(1)
        .unwrap_or_else(|| String::from("assets/daily.csv"));
    println!("opening {input}");
    let output = format!("{input}.png");

    let table = Table::load(&input).unwrap();
    assert!(
        table.width() > Table::DAY_COLUMN,
        "plotting needs a day column"
    );

    // The dataset carries no year, so everything is drawn onto one.
    let date = |row: &[f64]| {
        chrono::NaiveDate::from_ymd_opt(2024, row[0] as u32, row[Table::DAY_COLUMN] as u32)
            .expect("month or day out of range")
    };
    let mut points: Vec<(chrono::NaiveDate, f64, f64)> = table
        .rows()
        .iter()
        .map(|row| (date(row), row[1], row[2]))
        .collect();
    points.sort_by_key(|(day, ..)| *day);

    let first_date = points.first().unwrap().0;
    let last_date = points.last().unwrap().0.succ_opt().unwrap();
    let low = points
        .iter()
        .flat_map(|(_, temp, rain)| [*temp, *rain])
        .min_by(|left, right| left.total_cmp(right))
        .unwrap();
    let high = points
        .iter()
        .flat_map(|(_, temp, rain)| [*temp, *rain])
        .max_by(|left, right| left.total_cmp(right))
        .unwrap();

    let root = BitMapBackend::new(&output, (1920, 1080)).into_drawing_area();
    root.fill(&WHITE).unwrap();
    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Observations from {} to {}", first_date, last_date),
            ("sans-serif", 100).into_font(),
        )
        .margin(5)
        .x_label_area_size(80)
        .y_label_area_size(80)
        .build_cartesian_2d(first_date..last_date, low..high)
        .unwrap();

    chart.configure_mesh().draw().unwrap();

    chart
        .draw_series(LineSeries::new(
            points.iter().map(|(day, temp, _)| (*day, *temp)),
            RED,
        ))
        .unwrap()
        .label("Temperature")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));
    chart
        .draw_series(LineSeries::new(
            points.iter().map(|(day, _, rain)| (*day, *rain)),
            BLUE,
        ))
        .unwrap()
        .label("Rainfall")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .unwrap();

    root.present().unwrap();
}
