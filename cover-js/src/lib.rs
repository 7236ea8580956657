pub use ast::kind::LitValue;
pub use ast::kind::NodeKind;
pub use ast::kind::PropertyKind;
pub use ast::Ast;
pub use ast::NodeId;
pub use cover::Cover;
pub use cover::CoverageData;
pub use cover::FileCoverageData;
pub use cover::DATA_FILE;
pub use emit::render;
pub use err::CoverError;
pub use err::CoverResult;
pub use instrument::import_targets;
pub use instrument::instrument;
pub use instrument::instrument_file;
pub use instrument::write_instrumented;
pub use instrument::InstrumentOptions;
pub use instrument::RECORDER_BINDING;
pub use lcov::render_lcov;
pub use lcov::write_lcov;
pub use lcov::LCOV_FILE;

pub mod ast;
pub mod cover;
pub mod emit;
pub mod err;
pub mod instrument;
pub mod lcov;
