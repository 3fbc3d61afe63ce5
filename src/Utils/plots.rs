use nalgebra::{DMatrix, DVector};

/// Plot every polynomial column of an evaluated batch against the query
/// points, one PNG per column. Non-finite samples (NaN rows produced with
/// extrapolation disabled) are skipped; a column with no finite samples is
/// not plotted at all.
pub fn plot_evaluation(arg: String, names: Vec<String>, x: DVector<f64>, y: DMatrix<f64>) {
    use plotters::prelude::*;
    for col in 0..y.ncols() {
        let y_col = y.column(col);
        let series: Vec<(f64, f64)> = x
            .iter()
            .zip(y_col.iter())
            .filter(|&(&xv, &yv)| xv.is_finite() && yv.is_finite())
            .map(|(&xv, &yv)| (xv, yv))
            .collect();
        if series.is_empty() {
            continue;
        }
        let x_min = series.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
        let x_max = series.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
        let y_min = series.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        let y_max = series.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);

        let varname = names[col].clone();
        let filename = format!("{}.png", varname);
        let root_area = BitMapBackend::new(&filename, (800, 600)).into_drawing_area();
        root_area.fill(&WHITE).unwrap();

        // Create a chart builder
        let mut chart = ChartBuilder::on(&root_area)
            .caption(format!("{}", varname), ("sans-serif", 50))
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(30)
            .build_cartesian_2d(x_min * 0.95..x_max * 1.05, y_min * 0.95..y_max * 1.05)
            .unwrap();

        // Configure the mesh
        chart
            .configure_mesh()
            .x_desc(&arg)
            .y_desc(&varname)
            .draw()
            .unwrap();

        // Plot the column
        chart
            .draw_series(LineSeries::new(series, &Palette99::pick(col)))
            .unwrap()
            .label(format!(" {}", varname))
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], &Palette99::pick(col))
            });

        // Configure the legend
        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .unwrap();
    }
}
