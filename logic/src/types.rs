pub type FilePath = relative_path::RelativePathBuf;

pub type Env = Vec<(String, String)>;
