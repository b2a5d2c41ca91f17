//! Canned reply texts for the chat assistant.
//!
//! Markdown with emoji, rendered as-is by the web front-end. These are
//! product copy; edits here change what users see.

pub const GREETING: &str = "Hello! 👋 I'm VayuBot, your air quality assistant. I can help you with:\n\n\
    • Check AQI for any city\n\
    • Get health advice based on air quality\n\
    • Learn about pollutants (PM2.5, PM10, etc.)\n\
    • Understand AQI categories\n\n\
    What would you like to know?";

pub const HELP: &str = "I can help you with:\n\n\
    🌍 **AQI Information**: Check air quality for any city worldwide\n\
    🏥 **Health Advice**: Get personalized recommendations based on AQI\n\
    🔬 **Pollutant Info**: Learn about PM2.5, PM10, and other pollutants\n\
    📊 **AQI Categories**: Understand what different AQI levels mean\n\
    💡 **Safety Tips**: Get advice on protecting yourself from pollution\n\n\
    Just ask me anything about air quality!";

pub const AQI_CATEGORIES: &str = "**AQI (Air Quality Index) Categories:**\n\n\
    🟢 **0-50 (Good)**: Air quality is satisfactory. Enjoy outdoor activities!\n\n\
    🟡 **51-100 (Moderate)**: Acceptable for most, but sensitive individuals should limit prolonged outdoor exertion.\n\n\
    🟠 **101-150 (Unhealthy for Sensitive Groups)**: Children, elderly, and people with respiratory conditions should reduce outdoor activities.\n\n\
    🔴 **151-200 (Unhealthy)**: Everyone may experience health effects. Limit outdoor activities.\n\n\
    🟣 **201-300 (Very Unhealthy)**: Health alert! Everyone should avoid outdoor exertion.\n\n\
    ⚫ **301+ (Hazardous)**: Health emergency! Stay indoors with air purifiers.";

pub const PM25_EXPLAINER: &str = "**PM2.5 (Fine Particulate Matter):**\n\n\
    PM2.5 are tiny particles less than 2.5 micrometers in diameter — about 30 times smaller than a human hair!\n\n\
    🔬 **Sources:** Vehicle emissions, industrial processes, burning of fossil fuels, wildfires\n\n\
    ⚠️ **Health Impact:** Can penetrate deep into lungs and bloodstream, causing:\n\
    • Respiratory problems\n\
    • Heart disease\n\
    • Lung cancer\n\
    • Reduced life expectancy\n\n\
    **Safe Levels:**\n\
    • 0-12 μg/m³: Good\n\
    • 12-35 μg/m³: Moderate\n\
    • 35-55 μg/m³: Unhealthy for sensitive groups\n\
    • 55+ μg/m³: Unhealthy";

pub const PM10_EXPLAINER: &str = "**PM10 (Coarse Particulate Matter):**\n\n\
    PM10 are particles less than 10 micrometers in diameter.\n\n\
    🔬 **Sources:** Dust from roads, construction sites, agriculture, pollen\n\n\
    ⚠️ **Health Impact:** Can cause:\n\
    • Respiratory irritation\n\
    • Asthma attacks\n\
    • Bronchitis\n\
    • Reduced lung function\n\n\
    **Safe Levels:**\n\
    • 0-54 μg/m³: Good\n\
    • 55-154 μg/m³: Moderate\n\
    • 155-254 μg/m³: Unhealthy for sensitive groups\n\
    • 255+ μg/m³: Unhealthy";

pub const PROTECTION_TIPS: &str = "**Protection from Air Pollution:**\n\n\
    😷 **Wear Masks:** Use N95 or N99 masks when AQI > 150\n\n\
    🏠 **Indoor Air:** Use air purifiers with HEPA filters\n\n\
    🪟 **Windows:** Keep closed during high pollution hours (morning & evening)\n\n\
    🌳 **Avoid Peak Hours:** Stay indoors between 6-10 AM and 6-9 PM\n\n\
    🚗 **Reduce Exposure:** Avoid busy roads, use indoor gyms instead of outdoor exercise\n\n\
    🌱 **Indoor Plants:** Spider plants, peace lilies, and snake plants help filter air\n\n\
    💧 **Stay Hydrated:** Drink plenty of water to flush out toxins\n\n\
    🍎 **Healthy Diet:** Foods rich in antioxidants (fruits, vegetables) help combat pollution effects";

pub const CIGARETTE_EQUIVALENT: &str = "**Cigarette Equivalent of Air Pollution:**\n\n\
    1 cigarette ≈ 22 μg/m³ PM2.5 exposure for 24 hours\n\n\
    📊 **Examples:**\n\
    • Delhi (PM2.5 ~150): ~7 cigarettes/day\n\
    • Mumbai (PM2.5 ~80): ~4 cigarettes/day\n\
    • Beijing (PM2.5 ~100): ~5 cigarettes/day\n\n\
    Breathing polluted air is like passive smoking! 🚬💨\n\n\
    Check your city's AQI to see your daily cigarette equivalent.";

pub const HEALTH_EFFECTS: &str = "**Health Effects of Air Pollution:**\n\n\
    🫁 **Respiratory:**\n\
    • Asthma\n\
    • COPD\n\
    • Lung cancer\n\
    • Bronchitis\n\n\
    ❤️ **Cardiovascular:**\n\
    • Heart attacks\n\
    • Strokes\n\
    • High blood pressure\n\n\
    🧠 **Neurological:**\n\
    • Cognitive decline\n\
    • Dementia\n\
    • Reduced IQ in children\n\n\
    👶 **Children:**\n\
    • Stunted lung development\n\
    • Increased infections\n\
    • Learning difficulties\n\n\
    🤰 **Pregnancy:**\n\
    • Low birth weight\n\
    • Premature birth\n\
    • Developmental issues\n\n\
    **Long-term exposure reduces life expectancy by 1-3 years!**";

pub const BEST_CITIES: &str = "**Cities with Best Air Quality:**\n\n\
    🌏 **Global:**\n\
    1. Zurich, Switzerland\n\
    2. Helsinki, Finland\n\
    3. Honolulu, USA\n\
    4. Stockholm, Sweden\n\
    5. Calgary, Canada\n\n\
    🇮🇳 **India:**\n\
    1. Satna, MP\n\
    2. Kurnool, AP\n\
    3. Haldia, WB\n\
    4. Mysuru, Karnataka\n\
    5. Mangaluru, Karnataka\n\n\
    **Worst:**\n\
    • Delhi, India (Most polluted capital)\n\
    • Dhaka, Bangladesh\n\
    • Lahore, Pakistan\n\n\
    Want to check AQI for a specific city? Just ask!";

pub const WORST_CITIES: &str = "**Most Polluted Cities (2024):**\n\n\
    🌍 **Global:**\n\
    1. Delhi, India (AQI often 300+)\n\
    2. Dhaka, Bangladesh\n\
    3. Lahore, Pakistan\n\
    4. Kolkata, India\n\
    5. Baghdad, Iraq\n\n\
    🇮🇳 **India:**\n\
    1. Delhi NCR (Annual avg: ~200)\n\
    2. Ghaziabad\n\
    3. Noida\n\
    4. Faridabad\n\
    5. Lucknow\n\n\
    ⚠️ **Winter months (Nov-Jan) see AQI spike to 400-500 in these cities due to crop burning and reduced wind.**\n\n\
    Check real-time AQI for any city!";

pub const FALLBACK_MENU: &str = "I'm here to help with air quality questions! Try asking:\n\n\
    • 'What's the AQI in [city]?'\n\
    • 'Should I go outside?'\n\
    • 'What is PM2.5?'\n\
    • 'How to protect from pollution?'\n\
    • 'Health effects of air pollution'\n\n\
    What would you like to know? 🌬️";

pub const ADVICE_GOOD: &str =
    "✅ **It's safe to go outside!** Air quality is good. Enjoy outdoor activities.";

pub const ADVICE_MODERATE: &str = "✅ **Generally safe for outdoor activities.** \
    Sensitive individuals should be cautious during prolonged exertion.";

pub const ADVICE_SENSITIVE_LIMIT: &str =
    "⚠️ **Limit outdoor activities.** Consider wearing a mask if you must go outside.";

pub const ADVICE_SENSITIVE_CAUTION: &str =
    "⚠️ **Reduce prolonged outdoor exertion.** Sensitive groups should be cautious.";

pub const ADVICE_UNHEALTHY: &str = "🔴 **Avoid prolonged outdoor activities.** \
    Wear an N95 mask if you must go outside. Everyone may experience health effects.";

pub const ADVICE_VERY_UNHEALTHY: &str = "🚨 **Stay indoors!** Only go outside for \
    essential activities. Wear an N95/N99 mask. Use air purifiers indoors.";

pub const ADVICE_HAZARDOUS: &str = "🆘 **HEALTH EMERGENCY! Stay indoors!** Do not go \
    outside. Keep windows closed. Use air purifiers. This is hazardous for everyone.";

pub const ASTHMA_ADDENDUM: &str =
    "\n\n💊 **For Asthma:** Keep your inhaler handy, avoid triggers, monitor symptoms closely.";

pub const SENIOR_ADDENDUM: &str =
    "\n\n👴 **For Seniors:** Take extra precautions, monitor any breathing difficulties.";
