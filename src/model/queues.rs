// src/model/queues.rs

use std::collections::VecDeque;

/// Stock held by the three upstream tiers, front to back:
/// wholesaler, distributor, factory.
///
/// Every week the whole line moves one hop downstream. The wholesaler's stock
/// leaves the pipe and arrives at the retailer, and the factory slot is
/// refilled with whatever the player ordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipmentPipeline {
    buffer: VecDeque<u32>,
}

impl ShipmentPipeline {
    pub const DEPTH: usize = 3;

    /// Every upstream tier starts with the same stock.
    pub fn new(initial_stock: u32) -> Self {
        let mut buffer = VecDeque::with_capacity(Self::DEPTH);
        for _ in 0..Self::DEPTH {
            buffer.push_back(initial_stock);
        }
        Self { buffer }
    }

    /// Shifts the line one hop and feeds `production` in at the factory.
    ///
    /// Returns the quantity delivered to the retailer this week.
    pub fn advance(&mut self, production: u32) -> u32 {
        let arrival = self.buffer.pop_front().unwrap_or(0);
        self.buffer.push_back(production);
        arrival
    }

    pub fn wholesaler(&self) -> u32 {
        self.slot(0)
    }

    pub fn distributor(&self) -> u32 {
        self.slot(1)
    }

    pub fn factory(&self) -> u32 {
        self.slot(2)
    }

    /// Units in transit across all upstream tiers.
    pub fn total(&self) -> u64 {
        self.buffer.iter().map(|&quantity| u64::from(quantity)).sum()
    }

    fn slot(&self, index: usize) -> u32 {
        self.buffer.get(index).copied().unwrap_or(0)
    }
}
