pub mod word_handler;
