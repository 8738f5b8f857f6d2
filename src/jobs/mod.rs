mod monitor;

pub use monitor::run_monitor_loop;
