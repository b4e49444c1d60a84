pub mod capture;
pub mod cpu;
pub mod encode;
pub mod fixup;
pub mod pipeline;
pub mod service;
