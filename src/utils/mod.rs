pub mod copy;
pub mod task_group;

#[cfg(test)]
pub mod test_server;
