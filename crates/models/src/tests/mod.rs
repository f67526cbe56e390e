/// CRUD operations tests for the marketplace entities
pub mod crud_tests;
