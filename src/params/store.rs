use std::collections::BTreeMap;

use burn::module::{Module, Param};
use burn::tensor::backend::Backend;
use burn::tensor::{Tensor, TensorData};
use tracing::debug;

use super::{Connection, NamedParameters, ParamData, ParamKind};
use crate::activation::Nonlinearity;
use crate::cells::{compute_new_hidden_state, Bias};
use crate::config::ElmanConfig;
use crate::error::{ensure_shape, Result, RnnError};

/// The four tensors of one layer.
///
/// - `weight_hh`: `[hidden, hidden]`
/// - `bias_hh`: `[hidden]` or absent
/// - `weight_ih`: `[hidden, input]`
/// - `bias_ih`: `[hidden]` or absent
#[derive(Module, Debug)]
pub struct LayerParameters<B: Backend> {
    weight_hh: Param<Tensor<B, 2>>,
    bias_hh: Option<Param<Tensor<B, 1>>>,
    weight_ih: Param<Tensor<B, 2>>,
    bias_ih: Option<Param<Tensor<B, 1>>>,
}

impl<B: Backend> LayerParameters<B> {
    pub fn new(
        weight_hh: Tensor<B, 2>,
        bias_hh: Bias<B>,
        weight_ih: Tensor<B, 2>,
        bias_ih: Bias<B>,
    ) -> Self {
        Self {
            weight_hh: Param::from_tensor(weight_hh),
            bias_hh: into_param(bias_hh),
            weight_ih: Param::from_tensor(weight_ih),
            bias_ih: into_param(bias_ih),
        }
    }

    pub fn weight(&self, connection: Connection) -> Tensor<B, 2> {
        match connection {
            Connection::Hidden => self.weight_hh.val(),
            Connection::Input => self.weight_ih.val(),
        }
    }

    pub fn bias(&self, connection: Connection) -> Bias<B> {
        let bias = match connection {
            Connection::Hidden => &self.bias_hh,
            Connection::Input => &self.bias_ih,
        };
        bias.as_ref().map(Param::val).into()
    }

    /// Width of the layer input this layer expects.
    pub fn input_size(&self) -> usize {
        self.weight_ih.dims()[1]
    }

    pub fn hidden_size(&self) -> usize {
        self.weight_hh.dims()[0]
    }

    /// Runs the step function with this layer's tensors.
    pub fn step(
        &self,
        prev_hidden: Tensor<B, 2>,
        inputs: Tensor<B, 2>,
        activation: Nonlinearity,
    ) -> Result<Tensor<B, 2>> {
        compute_new_hidden_state(
            prev_hidden,
            inputs,
            self.weight(Connection::Hidden),
            self.bias(Connection::Hidden),
            self.weight(Connection::Input),
            self.bias(Connection::Input),
            activation,
        )
    }
}

fn into_param<B: Backend>(bias: Bias<B>) -> Option<Param<Tensor<B, 1>>> {
    match bias {
        Bias::Present(tensor) => Some(Param::from_tensor(tensor)),
        Bias::Absent => None,
    }
}

/// Read-only parameters of a multilayer Elman network, indexed by layer.
///
/// Built once from a trained model and shared by every forward pass.
#[derive(Module, Debug)]
pub struct ParameterStore<B: Backend> {
    layers: Vec<LayerParameters<B>>,
    #[module(skip)]
    input_size: usize,
    #[module(skip)]
    hidden_size: usize,
    /// Activation flag: true for ReLU, false for tanh
    #[module(skip)]
    relu: bool,
    #[module(skip)]
    bias: bool,
}

impl<B: Backend> ParameterStore<B> {
    /// Resolves every `weight_*_l{i}` / `bias_*_l{i}` tensor named by `config` from `source`.
    ///
    /// With `config.bias == false` the source's biases are ignored and every
    /// bias is [`Bias::Absent`].
    ///
    /// # Errors
    /// - [`RnnError::MissingParameter`] if a required tensor is not in `source`
    /// - [`RnnError::ShapeMismatch`] if a tensor has the wrong shape
    /// - [`RnnError::InvalidConfig`] if `config` itself is invalid
    pub fn from_named(
        config: &ElmanConfig,
        source: &impl NamedParameters,
        device: &B::Device,
    ) -> Result<Self> {
        config.validate()?;

        let mut layers = Vec::with_capacity(config.num_layers);
        for layer in 0..config.num_layers {
            let h = config.hidden_size;
            let d = config.layer_input_size(layer);

            let weight_hh = fetch(source, ParamKind::Weight(Connection::Hidden), layer, &[h, h])?;
            let weight_ih = fetch(source, ParamKind::Weight(Connection::Input), layer, &[h, d])?;
            let (bias_hh, bias_ih) = if config.bias {
                (
                    Some(fetch(source, ParamKind::Bias(Connection::Hidden), layer, &[h])?),
                    Some(fetch(source, ParamKind::Bias(Connection::Input), layer, &[h])?),
                )
            } else {
                (None, None)
            };

            layers.push(LayerParameters::new(
                matrix::<B>(weight_hh, device),
                bias_hh.map(|b| vector::<B>(b, device)).into(),
                matrix::<B>(weight_ih, device),
                bias_ih.map(|b| vector::<B>(b, device)).into(),
            ));
        }

        debug!(
            num_layers = config.num_layers,
            input_size = config.input_size,
            hidden_size = config.hidden_size,
            nonlinearity = %config.nonlinearity,
            bias = config.bias,
            "resolved elman parameters"
        );

        Ok(Self::assemble(config, layers))
    }

    /// Builds a store from already materialised layers, checking them against `config`.
    pub fn from_layers(config: &ElmanConfig, layers: Vec<LayerParameters<B>>) -> Result<Self> {
        config.validate()?;
        ensure_shape("layers", &[config.num_layers], &[layers.len()])?;

        for (index, layer) in layers.iter().enumerate() {
            let h = config.hidden_size;
            let d = config.layer_input_size(index);
            let hidden = ParamKind::Weight(Connection::Hidden).name(index);
            let input = ParamKind::Weight(Connection::Input).name(index);
            ensure_shape(hidden, &[h, h], &layer.weight(Connection::Hidden).dims())?;
            ensure_shape(input, &[h, d], &layer.weight(Connection::Input).dims())?;

            for connection in [Connection::Hidden, Connection::Input] {
                let name = ParamKind::Bias(connection).name(index);
                match (config.bias, layer.bias(connection)) {
                    (true, Bias::Present(bias)) => ensure_shape(name, &[h], &bias.dims())?,
                    (true, Bias::Absent) => return Err(RnnError::MissingParameter(name)),
                    (false, Bias::Present(_)) => {
                        return Err(RnnError::InvalidConfig(format!(
                            "`{name}` given but the configuration disables bias"
                        )))
                    }
                    (false, Bias::Absent) => {}
                }
            }
        }

        Ok(Self::assemble(config, layers))
    }

    fn assemble(config: &ElmanConfig, layers: Vec<LayerParameters<B>>) -> Self {
        Self {
            layers,
            input_size: config.input_size,
            hidden_size: config.hidden_size,
            relu: config.nonlinearity == Nonlinearity::Relu,
            bias: config.bias,
        }
    }

    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    pub fn activation(&self) -> Nonlinearity {
        if self.relu {
            Nonlinearity::Relu
        } else {
            Nonlinearity::Tanh
        }
    }

    pub fn has_bias(&self) -> bool {
        self.bias
    }

    /// Input dimension of `layer` (`D_l`).
    pub fn layer_input_size(&self, layer: usize) -> Result<usize> {
        Ok(self.layer(layer)?.input_size())
    }

    pub fn layer(&self, layer: usize) -> Result<&LayerParameters<B>> {
        self.layers.get(layer).ok_or(RnnError::LayerOutOfRange {
            layer,
            num_layers: self.layers.len(),
        })
    }

    pub fn layers(&self) -> &[LayerParameters<B>] {
        &self.layers
    }

    pub fn weight(&self, layer: usize, connection: Connection) -> Result<Tensor<B, 2>> {
        Ok(self.layer(layer)?.weight(connection))
    }

    /// Bias of `layer`, [`Bias::Absent`] when the network was built without bias.
    pub fn bias(&self, layer: usize, connection: Connection) -> Result<Bias<B>> {
        Ok(self.layer(layer)?.bias(connection))
    }

    /// Exports every tensor under its conventional name.
    pub fn named_parameters(&self) -> Result<BTreeMap<String, ParamData>> {
        let mut named = BTreeMap::new();
        for (index, layer) in self.layers.iter().enumerate() {
            for connection in [Connection::Hidden, Connection::Input] {
                let weight = layer.weight(connection);
                named.insert(
                    ParamKind::Weight(connection).name(index),
                    export(weight.dims().to_vec(), weight.into_data())?,
                );
                if let Bias::Present(bias) = layer.bias(connection) {
                    named.insert(
                        ParamKind::Bias(connection).name(index),
                        export(bias.dims().to_vec(), bias.into_data())?,
                    );
                }
            }
        }
        Ok(named)
    }
}

fn fetch(
    source: &impl NamedParameters,
    kind: ParamKind,
    layer: usize,
    expected: &[usize],
) -> Result<ParamData> {
    let name = kind.name(layer);
    let data = source
        .parameter(&name)
        .ok_or_else(|| RnnError::MissingParameter(name.clone()))?;
    ensure_shape(name.as_str(), expected, &data.shape)?;
    // Shape agreement alone does not guarantee a well-formed buffer.
    ensure_shape(
        format!("{name} buffer length"),
        &[expected.iter().product()],
        &[data.values.len()],
    )?;
    Ok(data)
}

fn matrix<B: Backend>(data: ParamData, device: &B::Device) -> Tensor<B, 2> {
    let shape = [data.shape[0], data.shape[1]];
    Tensor::from_data(TensorData::new(data.values, shape), device)
}

fn vector<B: Backend>(data: ParamData, device: &B::Device) -> Tensor<B, 1> {
    let shape = [data.shape[0]];
    Tensor::from_data(TensorData::new(data.values, shape), device)
}

fn export(shape: Vec<usize>, data: TensorData) -> Result<ParamData> {
    let values = data
        .convert::<f64>()
        .to_vec::<f64>()
        .map_err(|err| RnnError::TensorData(format!("{err:?}")))?;
    ParamData::new(shape, values)
}
