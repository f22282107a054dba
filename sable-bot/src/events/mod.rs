pub mod antiraid;
