use std::collections::BTreeMap;

use log::info;

use crate::{
    config::{resolve_rpc_url, OathstoneConfig},
    errors::Result,
    traits::{ChainConnection, Connector},
};

/// Live connections keyed by network name
#[derive(Debug)]
pub struct NetworkRegistry<C> {
    connections: BTreeMap<String, C>,
}

impl<C> Default for NetworkRegistry<C> {
    fn default() -> Self {
        Self {
            connections: BTreeMap::new(),
        }
    }
}

impl<C: ChainConnection> NetworkRegistry<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connects every network in `config`
    ///
    /// All endpoints are resolved before any connection is attempted, so a
    /// configuration mistake fails the call without side effects. Connections
    /// are installed only once every network connected; existing connections
    /// for networks in `config` are replaced, others are left alone.
    pub async fn connect_all<K>(&mut self, config: &OathstoneConfig, connector: &K) -> Result<()>
    where
        K: Connector<Connection = C>,
    {
        let mut endpoints = Vec::with_capacity(config.networks.len());
        for (name, network) in &config.networks {
            endpoints.push((name, network.environment, resolve_rpc_url(name, network)?));
        }

        let mut connected = Vec::with_capacity(endpoints.len());
        for (name, environment, rpc_url) in endpoints {
            let connection = connector.connect(name, rpc_url).await?;
            info!("connected to network '{}' ({})", name, environment.as_str());
            connected.push((name.clone(), connection));
        }
        self.connections.extend(connected);
        Ok(())
    }

    /// Connection for `network`, if one has been established
    pub fn get_connection(&self, network: &str) -> Option<&C> {
        self.connections.get(network)
    }

    pub fn is_connected(&self, network: &str) -> bool {
        self.connections.contains_key(network)
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Drops every connection
    pub fn clear(&mut self) {
        self.connections.clear();
    }
}
