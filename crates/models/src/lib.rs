pub mod errors;
pub mod db;
pub mod instructor;
pub mod course;
pub mod student;
pub mod enrollment;
pub mod role;
pub mod views;

#[cfg(test)]
mod tests;
