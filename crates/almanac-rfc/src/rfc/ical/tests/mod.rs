//! Whole-document tests for the reader and writer.

mod reader;
