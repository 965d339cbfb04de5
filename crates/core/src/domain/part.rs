use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type PartId = i64;

/// Socket value a cooler uses to declare it mounts on anything.
pub const UNIVERSAL_SOCKET: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "CPU")]
    Cpu,
    #[serde(rename = "GPU")]
    Gpu,
    #[serde(rename = "RAM")]
    Ram,
    Storage,
    #[serde(rename = "PSU")]
    Psu,
    Cooler,
    Motherboard,
    Case,
    CaseFan,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Cpu,
        Category::Gpu,
        Category::Ram,
        Category::Storage,
        Category::Psu,
        Category::Cooler,
        Category::Motherboard,
        Category::Case,
        Category::CaseFan,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Cpu => "CPU",
            Category::Gpu => "GPU",
            Category::Ram => "RAM",
            Category::Storage => "Storage",
            Category::Psu => "PSU",
            Category::Cooler => "Cooler",
            Category::Motherboard => "Motherboard",
            Category::Case => "Case",
            Category::CaseFan => "CaseFan",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemoryType {
    #[serde(rename = "DDR3")]
    Ddr3,
    #[serde(rename = "DDR4")]
    Ddr4,
    #[serde(rename = "DDR5")]
    Ddr5,
}

impl fmt::Display for MemoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MemoryType::Ddr3 => "DDR3",
            MemoryType::Ddr4 => "DDR4",
            MemoryType::Ddr5 => "DDR5",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormFactor {
    #[serde(rename = "EATX")]
    Eatx,
    #[serde(rename = "ATX")]
    Atx,
    #[serde(rename = "MicroATX")]
    MicroAtx,
    #[serde(rename = "MiniITX")]
    MiniItx,
    #[serde(other)]
    Other,
}

impl FormFactor {
    /// Whether a case of this form factor physically accepts `board`.
    pub fn case_fits_board(self, board: FormFactor) -> bool {
        use FormFactor::*;
        match (self, board) {
            (_, Other) => false,
            (Eatx, _) => true,
            (Atx, b) => b != Eatx,
            (MicroAtx, b) => matches!(b, MicroAtx | MiniItx),
            (MiniItx, b) => b == MiniItx,
            (Other, _) => false,
        }
    }
}

impl fmt::Display for FormFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FormFactor::Eatx => "EATX",
            FormFactor::Atx => "ATX",
            FormFactor::MicroAtx => "MicroATX",
            FormFactor::MiniItx => "MiniITX",
            FormFactor::Other => "Other",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuSpecs {
    pub socket: String,
    pub core_count: u32,
    pub thread_count: u32,
    pub base_clock_ghz: f64,
    pub boost_clock_ghz: f64,
    #[serde(default)]
    pub integrated_graphics: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpuSpecs {
    pub chipset: String,
    pub memory_gb: u32,
    pub core_clock_mhz: u32,
    pub boost_clock_mhz: u32,
    pub length_mm: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RamSpecs {
    pub memory_type: MemoryType,
    pub speed_mhz: u32,
    pub capacity_gb: u32,
    #[serde(default = "default_modules")]
    pub modules: u32,
}

fn default_modules() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageSpecs {
    pub capacity_gb: u32,
    #[serde(default)]
    pub interface: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PsuSpecs {
    pub wattage_rating: u32,
    #[serde(default)]
    pub efficiency_rating: Option<String>,
    #[serde(default)]
    pub modular: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoolerSpecs {
    pub socket: String,
    pub height_mm: u32,
    #[serde(default)]
    pub liquid: bool,
}

impl CoolerSpecs {
    pub fn fits_socket(&self, socket: &str) -> bool {
        self.socket == UNIVERSAL_SOCKET || self.socket == socket
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotherboardSpecs {
    pub socket: String,
    #[serde(default)]
    pub chipset: String,
    pub form_factor: FormFactor,
    pub memory_type: MemoryType,
    pub max_memory_gb: u32,
    #[serde(default)]
    pub memory_slots: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseSpecs {
    pub form_factor: FormFactor,
    pub max_gpu_length_mm: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseFanSpecs {
    pub size_mm: u32,
    #[serde(default)]
    pub max_rpm: Option<u32>,
}

/// Category-specific attributes. The variant is the part's category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category")]
pub enum PartSpecs {
    #[serde(rename = "CPU")]
    Cpu(CpuSpecs),
    #[serde(rename = "GPU")]
    Gpu(GpuSpecs),
    #[serde(rename = "RAM")]
    Ram(RamSpecs),
    Storage(StorageSpecs),
    #[serde(rename = "PSU")]
    Psu(PsuSpecs),
    Cooler(CoolerSpecs),
    Motherboard(MotherboardSpecs),
    Case(CaseSpecs),
    CaseFan(CaseFanSpecs),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub id: PartId,
    pub name: String,
    pub manufacturer: String,
    pub price: Decimal,
    #[serde(default)]
    pub wattage: Option<u32>,
    #[serde(default)]
    pub product_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(flatten)]
    pub specs: PartSpecs,
}

impl Part {
    pub fn category(&self) -> Category {
        match &self.specs {
            PartSpecs::Cpu(_) => Category::Cpu,
            PartSpecs::Gpu(_) => Category::Gpu,
            PartSpecs::Ram(_) => Category::Ram,
            PartSpecs::Storage(_) => Category::Storage,
            PartSpecs::Psu(_) => Category::Psu,
            PartSpecs::Cooler(_) => Category::Cooler,
            PartSpecs::Motherboard(_) => Category::Motherboard,
            PartSpecs::Case(_) => Category::Case,
            PartSpecs::CaseFan(_) => Category::CaseFan,
        }
    }

    /// Catalog price with malformed negatives read as zero.
    pub fn effective_price(&self) -> Decimal {
        self.price.max(Decimal::ZERO)
    }

    pub fn wattage_or_zero(&self) -> u32 {
        self.wattage.unwrap_or(0)
    }

    pub fn cpu(&self) -> Option<&CpuSpecs> {
        match &self.specs {
            PartSpecs::Cpu(s) => Some(s),
            _ => None,
        }
    }

    pub fn gpu(&self) -> Option<&GpuSpecs> {
        match &self.specs {
            PartSpecs::Gpu(s) => Some(s),
            _ => None,
        }
    }

    pub fn ram(&self) -> Option<&RamSpecs> {
        match &self.specs {
            PartSpecs::Ram(s) => Some(s),
            _ => None,
        }
    }

    pub fn storage(&self) -> Option<&StorageSpecs> {
        match &self.specs {
            PartSpecs::Storage(s) => Some(s),
            _ => None,
        }
    }

    pub fn psu(&self) -> Option<&PsuSpecs> {
        match &self.specs {
            PartSpecs::Psu(s) => Some(s),
            _ => None,
        }
    }

    pub fn cooler(&self) -> Option<&CoolerSpecs> {
        match &self.specs {
            PartSpecs::Cooler(s) => Some(s),
            _ => None,
        }
    }

    pub fn motherboard(&self) -> Option<&MotherboardSpecs> {
        match &self.specs {
            PartSpecs::Motherboard(s) => Some(s),
            _ => None,
        }
    }

    pub fn case(&self) -> Option<&CaseSpecs> {
        match &self.specs {
            PartSpecs::Case(s) => Some(s),
            _ => None,
        }
    }
}
