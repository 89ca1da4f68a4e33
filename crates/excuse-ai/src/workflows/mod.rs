pub mod delays;
