pub mod togglecommand;
