use chrono::Utc;
use hello_lambda_core::contract::InvocationContext;
use lambda_runtime::Context;

pub fn invocation_context_from_lambda(context: &Context) -> InvocationContext {
    invocation_context_from_parts(
        &context.request_id,
        &context.env_config.function_name,
        &context.env_config.version,
        context.env_config.memory,
        context.deadline,
        Utc::now().timestamp_millis(),
    )
}

/// Remaining time is the distance to the invocation deadline, floored at zero.
pub fn invocation_context_from_parts(
    request_id: &str,
    function_name: &str,
    function_version: &str,
    memory_mb: i32,
    deadline_epoch_ms: u64,
    now_epoch_ms: i64,
) -> InvocationContext {
    let now_epoch_ms = u64::try_from(now_epoch_ms).unwrap_or(0);

    InvocationContext {
        request_id: request_id.to_string(),
        function_name: function_name.to_string(),
        function_version: function_version.to_string(),
        memory_limit_in_mb: u32::try_from(memory_mb).unwrap_or(0),
        remaining_time_in_millis: deadline_epoch_ms.saturating_sub(now_epoch_ms),
    }
}
