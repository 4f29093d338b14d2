use linkstress::error::AppResult;

fn main() -> AppResult<()> {
    linkstress::run()
}
