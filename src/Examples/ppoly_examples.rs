#![allow(non_snake_case)]
use crate::Utils::plots::plot_evaluation;
use crate::Utils::results_io::save_evaluation_to_csv;
use crate::numerical::interpolation::PPoly::{Extrapolate, PPoly};
use log::info;
use nalgebra::{DMatrix, DVector};
use ndarray::arr3;
use num_complex::Complex64;
use simplelog::*;

fn init_logger() {
    let _ = CombinedLogger::init(vec![TermLogger::new(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

pub fn ppoly_examples(example: usize) {
    match example {
        0 => {
            // two linear pieces on [0, 1] and [1, 2], evaluated on a fine
            // grid with extrapolation, result saved and plotted
            init_logger();
            let c = arr3(&[[[2.0], [-1.0]], [[3.0], [5.0]]]);
            let ppoly = PPoly::new(c, vec![0.0, 1.0, 2.0], Extrapolate::Bool(true)).unwrap();

            info!(
                "piecewise polynomial of order {} with {} column(s)",
                ppoly.order_plus_one() - 1,
                ppoly.ncols()
            );
            let queries: Vec<f64> = (0..=250).map(|i| -0.25 + 0.01 * i as f64).collect();
            let y = ppoly.call(&queries, 0, None).unwrap();
            info!("evaluated {} points, {} columns", y.nrows(), y.ncols());

            let q = DVector::from_vec(queries);
            let headers = vec!["f".to_string()];
            save_evaluation_to_csv(&y, &headers, "ppoly_values.csv", &q, &"x".to_string())
                .unwrap();
            plot_evaluation("x".to_string(), headers, q, y);
        }
        1 => {
            // derivatives and antiderivatives of f(x) = x^2 on [0, 2]
            init_logger();
            let c = arr3(&[[[1.0]], [[0.0]], [[0.0]]]);
            let ppoly = PPoly::new(c, vec![0.0, 2.0], Extrapolate::Bool(true)).unwrap();
            let queries = vec![0.0, 0.5, 1.0, 1.5, 2.0];
            for nu in [-1, 0, 1, 2] {
                let y = ppoly.call(&queries, nu, None).unwrap();
                info!("nu = {}: {:?}", nu, y.column(0).iter().collect::<Vec<_>>());
            }
        }
        2 => {
            // decreasing breakpoints: same function described from the
            // right end, [2, 1] then [1, 0]
            init_logger();
            let c = arr3(&[[[-1.0], [2.0]], [[4.0], [5.0]]]);
            let ppoly = PPoly::new(c, vec![2.0, 1.0, 0.0], Extrapolate::Bool(true)).unwrap();
            let y = ppoly.call(&[0.25, 0.5, 1.0, 1.75], 0, None).unwrap();
            info!("descending breakpoints: {:?}", y.column(0).iter().collect::<Vec<_>>());
        }
        3 => {
            // sawtooth through periodic extrapolation of f(x) = x on [0, 1]
            init_logger();
            let c = arr3(&[[[1.0]], [[0.0]]]);
            let ppoly = PPoly::new(c, vec![0.0, 1.0], Extrapolate::Periodic).unwrap();
            let queries: Vec<f64> = (0..=60).map(|i| -1.5 + 0.1 * i as f64).collect();
            let y = ppoly.call(&queries, 0, None).unwrap();
            let q = DVector::from_vec(queries);
            plot_evaluation("x".to_string(), vec!["sawtooth".to_string()], q, y);
        }
        4 => {
            // complex coefficients: f(x) = (1 + i) x + 2 on [0, 1]
            init_logger();
            let c = arr3(&[
                [[Complex64::new(1.0, 1.0)]],
                [[Complex64::new(2.0, 0.0)]],
            ]);
            let ppoly = PPoly::new(c, vec![0.0, 1.0], Extrapolate::Bool(true)).unwrap();
            let y: DMatrix<Complex64> = ppoly.call(&[0.0, 0.5, 1.0], 0, None).unwrap();
            info!("complex values: {:?}", y.column(0).iter().collect::<Vec<_>>());
        }
        5 => {
            // growing a polynomial interval by interval with extend
            init_logger();
            let c = arr3(&[[[1.0]], [[0.0]]]);
            let mut ppoly = PPoly::new(c, vec![0.0, 1.0], Extrapolate::Bool(true)).unwrap();
            ppoly.extend(arr3(&[[[1.0]], [[1.0]]]), vec![2.0]).unwrap();
            ppoly.extend(arr3(&[[[-1.0]], [[2.0]]]), vec![3.0]).unwrap();
            info!("breakpoints after extension: {:?}", ppoly.x);
            let y = ppoly.call(&[0.5, 1.5, 2.5], 0, None).unwrap();
            info!("values: {:?}", y.column(0).iter().collect::<Vec<_>>());
        }
        _ => {
            println!("there is no example with number {}", example);
        }
    }
}
