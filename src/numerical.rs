/// piecewise polynomial evaluation engine: interval location and local
/// polynomial evaluation over batches of points
/// Example#1
/// ```
///    use RustedPPoly::numerical::interpolation::PPoly::{Extrapolate, PPoly};
///    use ndarray::arr3;
///    // two linear pieces on [0, 1] and [1, 2]
///    let c = arr3(&[[[2.0], [-1.0]], [[3.0], [5.0]]]);
///    let ppoly = PPoly::new(c, vec![0.0, 1.0, 2.0], Extrapolate::Bool(true)).unwrap();
///    // evaluate values and the first derivative at a batch of points
///    let y = ppoly.call(&[0.5, 1.5, 2.5], 0, None).unwrap();
///    let dy = ppoly.call(&[0.5, 1.5, 2.5], 1, None).unwrap();
///    println!("y = {:?} \n dy = {:?}", y, dy);
/// ```
pub mod interpolation;
