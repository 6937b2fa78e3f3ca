mod error;
mod platform;

fn main() -> Result<(), error::AppError> {
    platform::run_app()
}
