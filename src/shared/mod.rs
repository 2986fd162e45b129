pub mod constants;
pub mod pagination;
#[cfg(test)]
pub mod test_helpers;
pub mod types;
