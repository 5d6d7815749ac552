use {crate::InferError, base::Tensor};

/// Inference capability used by the frame pipeline.
///
/// `classify` takes `&mut self`: one caller at a time, no internal locking.
/// Implementations must be deterministic for a fixed model and input.
pub trait Classifier: Send {
    /// Side length of the square input the model expects.
    fn input_side(&self) -> usize;

    /// Number of scores produced per input.
    fn output_len(&self) -> usize;

    /// Maps a `[1, side, side, 3]` tensor to `output_len()` scores.
    fn classify(&mut self, input: &Tensor<f32>) -> Result<Vec<f32>, InferError>;
}

/// Checks that `input` has shape `[1, side, side, 3]`.
pub fn check_input(input: &Tensor<f32>, side: usize) -> Result<(), InferError> {
    if input.shape != [1, side, side, 3] {
        return Err(InferError::Shape(format!(
            "expected input shape [1, {side}, {side}, 3], got {:?}",
            input.shape
        )));
    }
    Ok(())
}
