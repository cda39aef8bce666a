fn main() {
    // Command failures are rendered inside `run`; only setup errors reach here.
    if let Err(err) = learnsync::run() {
        eprintln!("learnsync: {}", err);
    }
}
