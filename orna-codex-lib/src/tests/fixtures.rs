//! Small two-language codex shared by the unit tests.

use orna_codex_catalog::{Datasets, LanguageDocument};

use crate::normalize::{Catalog, normalize};

pub(crate) const EN: &str = r#"
{
  "text": {
    "category": "Category", "tags": "Tags", "tier": "Tier", "causes": "Causes",
    "cures": "Cures", "gives": "Gives", "immunities": "Immunities", "skills": "Skills"
  },
  "category": {
    "items": "Items", "monsters": "Monsters", "bosses": "Bosses", "spells": "Skills & Spells"
  },
  "codex": {
    "items": {
      "dragon-sword": {
        "name": "Dragon Sword", "tier": 7, "rarity": "Legendary",
        "tags": ["Weapon", "Two-handed"],
        "causes": [["Poison", 50]],
        "materials": [["items", "dragon-scale"]],
        "dropped_by": [["bosses", "dragon"]],
        "path": "/codex/items/dragon-sword/",
        "ornaguide_id": 42, "ornaguide_category": "item"
      },
      "dragon-scale": {
        "name": "Dragon Scale", "tier": 5, "tags": ["Material"]
      },
      "potion": {
        "name": "Potion", "tier": 1, "tags": ["Consumable"],
        "cures": [["Poison", null]]
      }
    },
    "monsters": {
      "goblin": {
        "name": "Goblin", "tier": 2, "family": "Goblinoid",
        "spells": [["spells", "venom"], ["spells", "toxic-cloud"]],
        "immunities": [["Blind", null]],
        "drops": [["items", "potion"], ["items", "ghost-item"]]
      }
    },
    "bosses": {
      "dragon": {
        "name": "Dragon", "tier": 10, "event": "Dragon Week",
        "spells": ["fire-breath", "venom"],
        "drops": [["items", "dragon-sword"]]
      }
    },
    "spells": {
      "venom": { "name": "Venom", "tier": 2, "causes": [["Poison", 50]] },
      "toxic-cloud": { "name": "Toxic Cloud", "tier": 4, "causes": [["Poison", 80], ["Blind", 20]] },
      "fire-breath": { "name": "Fire Breath", "tier": 8, "causes": [["Burning", 30]], "gives": [["Berserk", 100]] }
    }
  },
  "options": { "events": ["Dragon Week", "Harvest"] }
}
"#;

pub(crate) const ZH: &str = r#"
{
  "text": { "tags": "标签" },
  "category": { "items": "物品", "monsters": "怪物", "bosses": "头目", "spells": "技能&法术" },
  "codex": {
    "items": {
      "dragon-sword": { "name": "龙剑", "tier": 7, "tags": ["武器"] },
      "dragon-scale": { "name": "龙鳞", "tier": 5 }
    },
    "monsters": {
      "goblin": {
        "name": "哥布林", "tier": 2,
        "spells": [["spells", "venom"], ["spells", "toxic-cloud"]]
      }
    },
    "bosses": { "dragon": { "name": "巨龙", "tier": 10 } },
    "spells": {
      "venom": { "name": "毒液", "causes": [["中毒", 50]] },
      "toxic-cloud": { "name": "毒云", "causes": [["中毒", 80]] },
      "fire-breath": { "name": "火焰吐息" }
    }
  }
}
"#;

pub(crate) fn document(json: &str) -> LanguageDocument {
    serde_json::from_str(json).unwrap()
}

pub(crate) fn datasets() -> Datasets {
    Datasets::new()
        .with("en", document(EN))
        .with("zh-hans", document(ZH))
}

pub(crate) fn catalog(language: &str) -> Catalog {
    normalize(&datasets(), language).unwrap()
}
