// Collaborators at the edge of the engine: sequence and record sources,
// and the JSON / text reporting sinks.
pub mod fasta;
pub mod output_json;
pub mod output_text;
pub mod records;
