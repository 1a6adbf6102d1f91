pub mod chat;
pub mod doctor;
pub mod handshake;
pub mod tools;
