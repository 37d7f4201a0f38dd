/// Input-validation failures of the coding engine.
///
/// All variants are eager shape checks at the API boundary. An uncorrectable
/// received word is NOT an error: the decoder reports it as data
/// (`success == false`), since exceeding the correction radius is an expected
/// outcome of the channel model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CodecErr {
    /// Message value outside [0, 4095]
    InvalidMessage { value: u16 },
    /// Codeword value outside [0, 8388607]
    InvalidCodeword { value: u32 },
    /// Channel parameter outside its domain, e.g. a bit error rate
    /// outside [0, 1]
    InvalidArgument { field: &'static str, value: f64 },
    /// Block-stream padding metadata inconsistent with the block count
    InvalidPadding { pad_bits: usize, blocks: usize },
}
