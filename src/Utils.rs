//! different utility modules used throughout the project
/// logger set-up and saving of plotted curves into csv or text files
pub mod logger;
/// parse form documents with structure like "title1 key1: value1 key2: value2 title2 key3: value3" into a plot form
pub mod form_parser;
