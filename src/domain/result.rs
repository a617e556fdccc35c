//! Result type alias for Cookbook

use super::errors::CookbookError;

/// Result type alias for Cookbook operations
///
/// # Examples
///
/// ```
/// use cookbook::domain::result::Result;
/// use cookbook::domain::errors::CookbookError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(CookbookError::InvalidArgument("Recipe ID is required".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, CookbookError>;
