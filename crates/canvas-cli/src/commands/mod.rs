pub mod init;
pub mod post;
pub mod snapshot;

use canvas_core::errors::{ExError, ExErrorKind};
use canvas_core_types::RequestContext;
use serde::Serialize;

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<(), ExError> {
    let text = serde_json::to_string_pretty(value).map_err(|e| {
        ExError::new(ExErrorKind::Serialization)
            .with_op("print_json")
            .with_message(e.to_string())
    })?;
    println!("{}", text);
    Ok(())
}

/// Context for one CLI invocation
pub fn request_context() -> RequestContext {
    RequestContext::new().with_caller("cli")
}
