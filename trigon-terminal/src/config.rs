/// Command-line configuration for the terminal viewer
use std::io;
use std::path::PathBuf;

use trigon_core::RenderMode;

pub const USAGE: &str = "\
usage: trigon [OPTIONS] [MESH.stl]

options:
  --distance <D>   focal distance of the projection (default 60)
  --step <S>       camera movement per key press (default 2)
  --fps <N>        target frame rate (default 30)
  --wireframe      draw triangle outlines instead of filled faces
  --no-spin        do not rotate the object on its own";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// ASCII solid file to show; a cube when absent
    pub mesh_path: Option<PathBuf>,
    pub focal_distance: f32,
    pub camera_step: f32,
    pub target_fps: u32,
    pub mode: RenderMode,
    pub spin: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mesh_path: None,
            focal_distance: 60.0,
            camera_step: 2.0,
            target_fps: 30,
            mode: RenderMode::Filled,
            spin: true,
        }
    }
}

impl AppConfig {
    /// Parse arguments, not including the program name
    pub fn from_args<I>(args: I) -> io::Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--distance" => config.focal_distance = positive(&arg, args.next())?,
                "--step" => config.camera_step = positive(&arg, args.next())?,
                "--fps" => config.target_fps = positive(&arg, args.next())?.round() as u32,
                "--wireframe" => config.mode = RenderMode::Wireframe,
                "--no-spin" => config.spin = false,
                flag if flag.starts_with("--") => {
                    return Err(invalid(format!("unknown option {flag}\n\n{USAGE}")));
                }
                _ if config.mesh_path.is_none() => config.mesh_path = Some(PathBuf::from(&arg)),
                _ => return Err(invalid(format!("unexpected argument {arg}\n\n{USAGE}"))),
            }
        }

        Ok(config)
    }
}

fn positive(flag: &str, value: Option<String>) -> io::Result<f32> {
    let value = value.ok_or_else(|| invalid(format!("{flag} needs a value")))?;
    match value.parse::<f32>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(invalid(format!("{flag} expects a positive number, got {value:?}"))),
    }
}

fn invalid(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> io::Result<AppConfig> {
        AppConfig::from_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_defaults() {
        assert_eq!(parse(&[]).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_all_options() {
        let config = parse(&["--distance", "120", "model.stl", "--step", "0.5", "--fps", "60", "--wireframe", "--no-spin"]).unwrap();
        assert_eq!(config.mesh_path, Some(PathBuf::from("model.stl")));
        assert_eq!(config.focal_distance, 120.0);
        assert_eq!(config.camera_step, 0.5);
        assert_eq!(config.target_fps, 60);
        assert_eq!(config.mode, RenderMode::Wireframe);
        assert!(!config.spin);
    }

    #[test]
    fn test_rejects_bad_values() {
        let cases: [&[&str]; 5] = [
            &["--distance"],
            &["--distance", "-3"],
            &["--step", "fast"],
            &["--bogus"],
            &["a.stl", "b.stl"],
        ];
        for args in cases {
            let err = parse(args).unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        }
    }
}
