pub mod control;
pub mod network;
pub mod pasv;
pub mod port;

#[cfg(test)]
mod test_network;
