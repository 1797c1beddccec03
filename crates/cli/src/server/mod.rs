pub mod dispatch;

pub use dispatch::run_dispatch_loop;
