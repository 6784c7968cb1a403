use std::path::PathBuf;

fn fallback_dotenv_path(home_dir: Option<PathBuf>) -> Option<PathBuf> {
    Some(home_dir?.join(".config/keyfix/.env"))
}

pub fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    let Some(path) = fallback_dotenv_path(dirs::home_dir()) else {
        return;
    };
    if path.is_file() {
        let _ = dotenvy::from_path(&path);
    }
}
