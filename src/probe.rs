use std::path::Path;

pub trait Probe {
    fn is_executable(&self, path: &Path) -> bool;
}

/// Checks the real filesystem. Symlinks are followed; any error while
/// reading metadata or checking access means the path does not qualify.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsProbe;

impl Probe for FsProbe {
    #[cfg(unix)]
    fn is_executable(&self, path: &Path) -> bool {
        use rustix::fs::{access, Access};

        // access() says yes to directories too
        std::fs::metadata(path).is_ok_and(|metadata| metadata.is_file())
            && access(path, Access::EXEC_OK).is_ok()
    }

    #[cfg(not(unix))]
    fn is_executable(&self, path: &Path) -> bool {
        std::fs::metadata(path).is_ok_and(|metadata| metadata.is_file())
    }
}

impl<P: Probe + ?Sized> Probe for &P {
    fn is_executable(&self, path: &Path) -> bool {
        (**self).is_executable(path)
    }
}

#[cfg(all(test, unix))]
mod test {
    use std::fs::{self, File};
    use std::os::unix::fs::PermissionsExt;

    use tempfile::tempdir;

    use super::*;

    fn create_with_mode(path: &Path, mode: u32) -> anyhow::Result<()> {
        File::create(path)?;
        fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
        Ok(())
    }

    #[test]
    fn executable_file() -> anyhow::Result<()> {
        let tmp_dir = tempdir()?;
        let path = tmp_dir.path().join("tool");
        create_with_mode(&path, 0o755)?;
        assert!(FsProbe.is_executable(&path));
        Ok(())
    }

    #[test]
    fn owner_only_executable() -> anyhow::Result<()> {
        let tmp_dir = tempdir()?;
        let path = tmp_dir.path().join("tool");
        create_with_mode(&path, 0o700)?;
        assert!(FsProbe.is_executable(&path));
        Ok(())
    }

    #[test]
    fn execute_bit_for_others_only_is_skipped() -> anyhow::Result<()> {
        // root may run anything with some execute bit set
        if rustix::process::getuid().is_root() {
            return Ok(());
        }
        let tmp_dir = tempdir()?;
        let path = tmp_dir.path().join("tool");
        create_with_mode(&path, 0o601)?;
        assert!(!FsProbe.is_executable(&path));
        Ok(())
    }

    #[test]
    fn plain_file_is_skipped() -> anyhow::Result<()> {
        let tmp_dir = tempdir()?;
        let path = tmp_dir.path().join("notes.txt");
        create_with_mode(&path, 0o644)?;
        assert!(!FsProbe.is_executable(&path));
        Ok(())
    }

    #[test]
    fn directory_is_skipped() -> anyhow::Result<()> {
        let tmp_dir = tempdir()?;
        let dir = tmp_dir.path().join("bin");
        fs::create_dir(&dir)?;
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o755))?;
        assert!(!FsProbe.is_executable(&dir));
        Ok(())
    }

    #[test]
    fn missing_path_is_skipped() -> anyhow::Result<()> {
        let tmp_dir = tempdir()?;
        assert!(!FsProbe.is_executable(&tmp_dir.path().join("nothing")));
        Ok(())
    }

    #[test]
    fn symlink_to_executable() -> anyhow::Result<()> {
        let tmp_dir = tempdir()?;
        let target = tmp_dir.path().join("real");
        create_with_mode(&target, 0o755)?;
        let link = tmp_dir.path().join("link");
        std::os::unix::fs::symlink(&target, &link)?;
        assert!(FsProbe.is_executable(&link));

        let dangling = tmp_dir.path().join("dangling");
        std::os::unix::fs::symlink(tmp_dir.path().join("gone"), &dangling)?;
        assert!(!FsProbe.is_executable(&dangling));
        Ok(())
    }
}
