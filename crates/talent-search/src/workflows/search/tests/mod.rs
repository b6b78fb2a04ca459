mod common;
mod evaluation;
mod pagination;
mod service;
