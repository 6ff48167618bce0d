use anyhow::{Result, bail};
use std::path::{Path, PathBuf};

pub fn validate_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("路徑不存在: {}", path.display());
    }
    if !path.is_dir() {
        bail!("路徑不是資料夾: {}", path.display());
    }
    Ok(())
}

pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// 輸出資料夾不得與輸入資料夾相同，也不得位於其中
pub fn validate_output_outside_input(input_dir: &Path, output_dir: &Path) -> Result<()> {
    let input = resolve_path(input_dir);
    let output = resolve_path(output_dir);

    if output.starts_with(&input) {
        bail!(
            "輸出資料夾不可位於輸入資料夾內: {} -> {}",
            input_dir.display(),
            output_dir.display()
        );
    }
    Ok(())
}

/// 尚未建立的路徑以上層目錄的實際位置補齊
fn resolve_path(path: &Path) -> PathBuf {
    if let Ok(resolved) = path.canonicalize() {
        return resolved;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => resolve_path(parent).join(name),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_directory_rejects_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.txt");
        std::fs::write(&file, b"x").unwrap();

        assert!(validate_directory_exists(temp_dir.path()).is_ok());
        assert!(validate_directory_exists(&file).is_err());
        assert!(validate_directory_exists(&temp_dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_output_inside_input_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("in");
        let sibling = temp_dir.path().join("out");
        std::fs::create_dir_all(&input).unwrap();
        std::fs::create_dir_all(&sibling).unwrap();
        std::fs::create_dir_all(input.join("nested")).unwrap();

        assert!(validate_output_outside_input(&input, &sibling).is_ok());
        assert!(validate_output_outside_input(&input, &input).is_err());
        assert!(validate_output_outside_input(&input, &input.join("nested")).is_err());
    }
}
