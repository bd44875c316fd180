pub mod pir;
