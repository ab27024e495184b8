use nix::{
  errno::Errno,
  sys::signal::{killpg, Signal},
  unistd::Pid,
};
use tokio::process::Child;

/// Process group of a spawned program.
///
/// The program must be spawned as the leader of a new group. Killing the group
/// also kills every process the program started. The group is killed when the
/// handle is dropped, so a cancelled execution leaves nothing running.
#[derive(Debug)]
pub struct ProcessGroup {
  pgid: Option<Pid>,
}

impl ProcessGroup {
  pub fn of(child: &Child) -> Self {
    Self {
      pgid: child.id().map(|id| Pid::from_raw(id as i32)),
    }
  }

  /// Send `SIGKILL` to every process of the group.
  pub fn kill(&mut self) {
    let pgid = match self.pgid.take() {
      Some(pgid) => pgid,
      None => return,
    };
    match killpg(pgid, Signal::SIGKILL) {
      // Nothing is left in the group.
      Ok(()) | Err(Errno::ESRCH) => {}
      Err(err) => log::warn!("failed to kill process group {}: {}", pgid, err),
    }
  }
}

impl Drop for ProcessGroup {
  fn drop(&mut self) {
    self.kill();
  }
}
