#[path = "launcher.rs"]
mod launcher;

fn main() -> std::process::ExitCode {
    launcher::launch("admin", server::run_admin)
}
