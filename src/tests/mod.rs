// Test modules for openai-keycheck
//
// Each source module has a corresponding test file that focuses on the
// observable behaviour: environment side effects, printed diagnostics and
// the pass/fail result.

// Shared fixtures
pub mod helpers;
