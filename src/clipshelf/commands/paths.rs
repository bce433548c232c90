use crate::commands::CmdResult;
use crate::store::AppPaths;

pub fn run(paths: &AppPaths) -> CmdResult {
    CmdResult::default().with_paths(vec![
        ("data".to_string(), paths.data_dir.clone()),
        ("history".to_string(), paths.history_file()),
        ("settings".to_string(), paths.settings_file()),
        ("images".to_string(), paths.images_dir()),
    ])
}
