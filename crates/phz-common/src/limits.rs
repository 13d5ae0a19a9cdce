//! Centralized limits and thresholds for the type checker.
//!
//! Every recursive walk in the checker and the type algebra is bounded by one
//! of these constants. Exceeding a limit degrades to `mixed` rather than
//! failing the check.

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum depth for expression type checking.
///
/// Each nested expression (a call inside an argument inside a call, and so
/// on) adds a frame. Beyond this depth the expression is typed `mixed` and
/// its children are not visited.
///
/// ```php
/// f(f(f(f(f(f(f(f(f(f(f(f(/* ... */))))))))))));
/// ```
pub const MAX_EXPR_CHECK_DEPTH: u32 = 500;

/// Maximum statement nesting walked when collecting return types.
///
/// Deeper blocks contribute nothing to the collected union.
pub const MAX_RETURN_COLLECTION_DEPTH: u32 = 256;

/// Maximum nesting of generic type parameters compared by the parameter
/// matcher. Parameters nested deeper are treated as matching.
///
/// ```php
/// /** @param array<string, array<string, array<int, Foo>>> $rows */
/// ```
pub const MAX_GENERIC_COMPARE_DEPTH: u32 = 32;
