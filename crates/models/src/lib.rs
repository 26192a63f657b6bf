pub mod errors;
pub mod db;
pub mod lti_link;

#[cfg(test)]
mod tests;
