use std::env;

/// 実行環境を表す
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

/// 環境変数 ENV から実行環境を判定する
/// 未設定の場合、デバッグビルドなら Development、リリースビルドなら Production とみなす
pub fn which() -> Environment {
    #[cfg(debug_assertions)]
    let default_env = Environment::Development;
    #[cfg(not(debug_assertions))]
    let default_env = Environment::Production;

    match env::var("ENV") {
        Ok(v) if v.eq_ignore_ascii_case("production") => Environment::Production,
        Ok(v) if v.eq_ignore_ascii_case("development") => Environment::Development,
        _ => default_env,
    }
}
