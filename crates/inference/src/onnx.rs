use {
    crate::{Classifier, InferError, ModelConfig, check_input},
    base::Tensor,
    memmap2::Mmap,
    ort::{
        session::Session,
        value::{Tensor as OrtTensor, ValueType},
    },
    std::fs::File,
};

/// `Classifier` backed by an ONNX Runtime session.
///
/// The model must have one NHWC float input `[1, side, side, 3]` (batch and
/// spatial dimensions may be dynamic) and one output whose last dimension is
/// the class count.
pub struct OnnxClassifier {
    session: Session,
    input_name: String,
    output_name: String,
    input_side: usize,
    output_len: usize,
}

fn tensor_dims(value_type: &ValueType) -> Option<Vec<i64>> {
    match value_type {
        ValueType::Tensor { shape, .. } => Some(shape.iter().copied().collect()),
        _ => None,
    }
}

// a dimension matches when it is dynamic (negative) or equal to `expected`
fn dim_matches(dim: i64, expected: usize) -> bool {
    dim < 0 || dim as usize == expected
}

/// Validates an NHWC input shape against the configured side length.
pub(crate) fn check_input_dims(dims: &[i64], side: usize) -> Result<(), InferError> {
    match dims {
        [batch, height, width, channels]
            if dim_matches(*batch, 1)
                && dim_matches(*height, side)
                && dim_matches(*width, side)
                && *channels == 3 =>
        {
            Ok(())
        }
        _ => Err(InferError::ModelLoad(format!(
            "model input {dims:?} does not accept [1, {side}, {side}, 3]"
        ))),
    }
}

/// Class count from an output shape like `[1, N]` or `[N]`.
pub(crate) fn output_len_from_dims(dims: &[i64]) -> Result<usize, InferError> {
    match dims.split_last() {
        Some((&last, rest)) if last > 0 && rest.iter().all(|&d| dim_matches(d, 1)) => {
            Ok(last as usize)
        }
        _ => Err(InferError::ModelLoad(format!(
            "model output {dims:?} is not a single score vector"
        ))),
    }
}

impl OnnxClassifier {
    /// Loads the model named by `config`.
    ///
    /// The file is memory-mapped read-only for the duration of session
    /// creation. Fails with `InferError::ModelLoad` if the file is missing
    /// or malformed, or its input/output shapes do not fit the pipeline.
    pub fn load(config: &ModelConfig) -> Result<Self, InferError> {
        config.validate()?;
        let path = config.model_path();
        let file = File::open(path)
            .map_err(|e| InferError::ModelLoad(format!("{}: {e}", path.display())))?;
        // SAFETY: the mapping is read-only and dropped before this function returns
        let mapped = unsafe { Mmap::map(&file) }
            .map_err(|e| InferError::ModelLoad(format!("{}: {e}", path.display())))?;

        let mut builder = Session::builder()
            .map_err(|e| InferError::ModelLoad(format!("failed to create session builder: {e}")))?;
        builder = builder
            .with_intra_threads(config.threads())
            .map_err(|e| InferError::ModelLoad(format!("failed to set intra threads: {e}")))?;
        let session = builder
            .commit_from_memory(&mapped)
            .map_err(|e| InferError::ModelLoad(format!("{}: {e}", path.display())))?;

        let (input, output) = match (session.inputs(), session.outputs()) {
            ([input], [output]) => (input, output),
            (inputs, outputs) => {
                return Err(InferError::ModelLoad(format!(
                    "expected 1 input and 1 output, model has {} and {}",
                    inputs.len(),
                    outputs.len()
                )));
            }
        };

        let input_dims = tensor_dims(input.dtype()).ok_or_else(|| {
            InferError::ModelLoad(format!("input '{}' is not a tensor", input.name()))
        })?;
        check_input_dims(&input_dims, config.input_side())?;

        let output_dims = tensor_dims(output.dtype()).ok_or_else(|| {
            InferError::ModelLoad(format!("output '{}' is not a tensor", output.name()))
        })?;
        let output_len = output_len_from_dims(&output_dims)?;

        let input_name = input.name().to_string();
        let output_name = output.name().to_string();

        log::info!(
            "loaded model {} (input '{}' {:?}, output '{}' {:?}, {} threads)",
            path.display(),
            input_name,
            input_dims,
            output_name,
            output_dims,
            config.threads()
        );

        Ok(Self {
            session,
            input_name,
            output_name,
            input_side: config.input_side(),
            output_len,
        })
    }
}

impl Classifier for OnnxClassifier {
    fn input_side(&self) -> usize {
        self.input_side
    }

    fn output_len(&self) -> usize {
        self.output_len
    }

    fn classify(&mut self, input: &Tensor<f32>) -> Result<Vec<f32>, InferError> {
        check_input(input, self.input_side)?;

        let shape: Vec<i64> = input.shape.iter().map(|&d| d as i64).collect();
        let value = OrtTensor::from_array((shape, input.data.clone()))
            .map_err(|e| InferError::Engine(format!("failed to create input tensor: {e}")))?;

        let outputs = self
            .session
            .run(ort::inputs![self.input_name.as_str() => value])
            .map_err(|e| InferError::Engine(format!("inference failed: {e}")))?;

        let (_, scores) = outputs[self.output_name.as_str()]
            .try_extract_tensor::<f32>()
            .map_err(|e| {
                InferError::Engine(format!("output '{}' is not f32: {e}", self.output_name))
            })?;

        if scores.len() != self.output_len {
            return Err(InferError::Engine(format!(
                "expected {} scores, got {}",
                self.output_len,
                scores.len()
            )));
        }
        Ok(scores.to_vec())
    }
}
