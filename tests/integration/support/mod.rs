pub mod marketplace_users;
