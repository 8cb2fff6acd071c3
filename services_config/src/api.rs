//! Bridge adapter exposing the configuration service
//!
//! Maps bus-level actions and JSON arguments onto [`ConfigService`]
//! operations. Argument problems are reported as error outcomes, never
//! panics; they travel back to the caller as data.

use crate::store::KvStore;
use crate::{ConfigService, PositionRecord};
use bridge::{HandlerReply, ServiceHandler, ServiceManifest};
use serde_json::{json, Value};

/// Public name the service registers under
pub const SERVICE_NAME: &str = "configService";

/// Actions declared in the service manifest
pub const ACTIONS: [&str; 5] = [
    "get_setting",
    "set_setting",
    "get_position",
    "save_position",
    "cleanup",
];

/// Handler adapting [`ConfigService`] to the bridge
pub struct ConfigApi<S: KvStore> {
    service: ConfigService<S>,
    now: u64,
}

impl<S: KvStore> ConfigApi<S> {
    /// Wraps an initialized service
    pub fn new(service: ConfigService<S>) -> Self {
        Self { service, now: 0 }
    }

    /// Returns the static manifest for this service
    pub fn manifest() -> ServiceManifest {
        ServiceManifest::new(SERVICE_NAME, ACTIONS).expect("static manifest is valid")
    }

    /// Advances the host-supplied clock used to stamp saved positions
    pub fn set_now(&mut self, now: u64) {
        self.now = now;
    }

    /// Returns the wrapped service
    pub fn service(&self) -> &ConfigService<S> {
        &self.service
    }

    fn str_arg<'a>(args: &'a [Value], index: usize) -> Result<&'a str, String> {
        args.get(index)
            .and_then(Value::as_str)
            .ok_or_else(|| format!("argument {} must be a string", index))
    }

    fn get_setting(&self, args: &[Value]) -> Result<Value, String> {
        let key = Self::str_arg(args, 0)?;
        Ok(self.service.setting(key).cloned().unwrap_or(Value::Null))
    }

    fn set_setting(&mut self, args: &[Value]) -> Result<Value, String> {
        let key = Self::str_arg(args, 0)?.to_string();
        let value = args
            .get(1)
            .cloned()
            .ok_or_else(|| "argument 1 must be a value".to_string())?;
        self.service
            .set_setting(key, value)
            .map_err(|e| e.to_string())?;
        Ok(Value::Null)
    }

    fn get_position(&self, args: &[Value]) -> Result<Value, String> {
        let script = Self::str_arg(args, 0)?;
        let env = Self::str_arg(args, 1)?;
        let file = Self::str_arg(args, 2)?;
        match self.service.position(script, env, file) {
            Some(entry) => serde_json::to_value(entry).map_err(|e| e.to_string()),
            None => Ok(Value::Null),
        }
    }

    fn save_position(&mut self, args: &[Value]) -> Result<Value, String> {
        let script = Self::str_arg(args, 0)?.to_string();
        let env = Self::str_arg(args, 1)?.to_string();
        let file = Self::str_arg(args, 2)?.to_string();
        let record: PositionRecord = args
            .get(3)
            .cloned()
            .ok_or_else(|| "argument 3 must be a position record".to_string())
            .and_then(|value| serde_json::from_value(value).map_err(|e| e.to_string()))?;
        self.service
            .save_position(&script, &env, &file, record, self.now)
            .map_err(|e| e.to_string())?;
        Ok(Value::Null)
    }

    fn cleanup(&mut self) -> Result<Value, String> {
        let evicted = self
            .service
            .cleanup_old_entries()
            .map_err(|e| e.to_string())?;
        Ok(json!(evicted))
    }
}

impl<S: KvStore> ServiceHandler for ConfigApi<S> {
    fn invoke(&mut self, action: &str, args: Vec<Value>) -> HandlerReply {
        let outcome = match action {
            "get_setting" => self.get_setting(&args),
            "set_setting" => self.set_setting(&args),
            "get_position" => self.get_position(&args),
            "save_position" => self.save_position(&args),
            "cleanup" => self.cleanup(),
            _ => Err(format!("no such action: {}", action)),
        };
        HandlerReply::Ready(outcome)
    }
}
