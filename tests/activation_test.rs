//! Tests for the step nonlinearities

use burn::backend::NdArray;
use burn::tensor::{Distribution, Tensor};
use elman::activation::Nonlinearity;
use elman::RnnError;

type Backend = NdArray<f64>;

#[test]
fn test_tanh_zero() {
    let device = Default::default();
    let x = Tensor::<Backend, 1>::zeros([5], &device);
    let y = Nonlinearity::Tanh.forward(x);

    // tanh(0) = 0
    let sum = y.sum().into_scalar();
    assert!(sum.abs() < 1e-12);
}

#[test]
fn test_relu_negative_is_zero() {
    let device = Default::default();
    let x = Tensor::<Backend, 2>::random([4, 8], Distribution::Uniform(-5.0, -0.01), &device);
    let y = Nonlinearity::Relu.forward(x);

    let values = y.into_data().to_vec::<f64>().unwrap();
    assert!(values.iter().all(|&v| v == 0.0));
}

#[test]
fn test_relu_positive_is_identity() {
    let device = Default::default();
    let x = Tensor::<Backend, 2>::random([3, 5], Distribution::Uniform(0.0, 3.0), &device);
    let y = Nonlinearity::Relu.forward(x.clone());

    assert_eq!(
        y.into_data().to_vec::<f64>().unwrap(),
        x.into_data().to_vec::<f64>().unwrap()
    );
}

#[test]
fn test_tanh_elementwise() {
    let device = Default::default();
    let x = Tensor::<Backend, 3>::random([2, 3, 4], Distribution::Uniform(-2.0, 2.0), &device);
    let y = Nonlinearity::Tanh.forward(x.clone());

    assert_eq!(y.dims(), [2, 3, 4]);

    let xs = x.into_data().to_vec::<f64>().unwrap();
    let ys = y.into_data().to_vec::<f64>().unwrap();
    for (x_val, y_val) in xs.iter().zip(&ys) {
        assert!(
            (y_val - x_val.tanh()).abs() < 1e-12,
            "tanh({}) gave {}",
            x_val,
            y_val
        );
    }
}

#[test]
fn test_tanh_saturation() {
    let device = Default::default();

    let y_pos = Nonlinearity::Tanh.forward(Tensor::<Backend, 1>::full([1], 100.0, &device));
    assert!((y_pos.into_scalar() - 1.0).abs() < 1e-12);

    let y_neg = Nonlinearity::Tanh.forward(Tensor::<Backend, 1>::full([1], -100.0, &device));
    assert!((y_neg.into_scalar() + 1.0).abs() < 1e-12);
}

#[test]
fn test_parse_is_strict() {
    assert_eq!("relu".parse::<Nonlinearity>(), Ok(Nonlinearity::Relu));
    assert_eq!("tanh".parse::<Nonlinearity>(), Ok(Nonlinearity::Tanh));
    assert_eq!(
        "tahn".parse::<Nonlinearity>(),
        Err(RnnError::UnknownNonlinearity("tahn".to_string()))
    );
}
