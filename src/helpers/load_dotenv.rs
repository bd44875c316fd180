/// Seed the environment from `.env` in the working directory, if present
pub fn load_dotenv() -> bool {
    dotenv::dotenv().is_ok()
}
