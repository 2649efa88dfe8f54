/// Reading and writing of the Gaussian cube format.
pub mod cube;
/// A line reader that tracks line numbers for parse errors.
pub mod reader;
