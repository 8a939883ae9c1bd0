//! Operation boundary logging
//!
//! Every event carries `component`, `op` and `event`. Callers depend on
//! `tracing` directly since the expansion names it.

#[doc(hidden)]
#[macro_export]
macro_rules! __op_event {
    ($level:ident, $op:expr, $event:expr $(, $($field:tt)*)?) => {
        tracing::event!(
            tracing::Level::$level,
            component = module_path!(),
            op = $op,
            event = $event,
            $($($field)*)?
        )
    };
}

/// Log the start of an operation
///
/// ```
/// # use canvas_core::log_op_start;
/// log_op_start!("create_post");
/// log_op_start!("update_post", post_id = 42);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__op_event!(INFO, $op, $crate::core_types::schema::EVENT_START $(, $($field)*)?)
    };
}

/// Log the successful end of an operation; `duration_ms` comes first
///
/// ```
/// # use canvas_core::log_op_end;
/// log_op_end!("list_posts", duration_ms = 3, row_count = 0);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__op_event!(
            INFO,
            $op,
            $crate::core_types::schema::EVENT_END,
            duration_ms = $duration
            $(, $($field)*)?
        )
    };
}

/// Log a failed operation with the error's kind and stable code
///
/// `$err` is anything convertible into `ExError`.
///
/// ```
/// # use canvas_core::{log_op_error, errors::CanvasError};
/// let err = CanvasError::PostNotFound { post_id: 1 };
/// log_op_error!("update_post", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::__op_event!(
            ERROR,
            $op,
            $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code()
            $(, $($field)*)?
        );
    }};
}
