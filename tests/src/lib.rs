//! Cross-crate scenarios exercising the compiler and runtime together.

#[cfg(test)]
mod compile_and_match;
