pub mod swagger_main;
pub mod task;
pub mod user;

#[cfg(test)]
pub mod test_util;

/// Greets callers hitting the root of the API.
pub async fn welcome() -> &'static str {
    "Welcome to the task list API."
}
