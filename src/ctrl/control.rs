use termion::event::Key;

use crate::cmds::{Cmd, CmdError, CmdResult};
use crate::config::KeyMap;
use crate::picker::Datepicker;

pub trait Control {
    fn send_cmd(&mut self, cmd: &Cmd, picker: &mut Datepicker) -> CmdResult;
}

/// Translates keys through a key map and hands the commands to `C`.
pub struct Controller<'a, C: Control> {
    key_map: &'a KeyMap,
    recvr: C,
}

impl<'a, C: Control> Controller<'a, C> {
    pub fn new(key_map: &'a KeyMap, recvr: C) -> Controller<'a, C> {
        Controller { key_map, recvr }
    }

    pub fn handle(&mut self, key: Key, picker: &mut Datepicker) -> CmdResult {
        match self.key_map.get(&key) {
            Some(cmd) => {
                log::trace!("{:?} -> {}", key, cmd);
                self.recvr.send_cmd(cmd, picker)
            }
            None => Err(CmdError::new(format!("Could not find map for '{:?}'", key))),
        }
    }
}
